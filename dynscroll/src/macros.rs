#[cfg(feature = "tracing")]
macro_rules! ds_trace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "dynscroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ds_trace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! ds_debug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "dynscroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ds_debug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! ds_warn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "dynscroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ds_warn {
    ($($tt:tt)*) => {};
}
