#[cfg(feature = "tracing")]
macro_rules! dsa_trace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "dynscroll_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! dsa_trace {
    ($($tt:tt)*) => {};
}
