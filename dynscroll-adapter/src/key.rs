#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type ElementIndexMap<E> = HashMap<E, i64>;
#[cfg(not(feature = "std"))]
pub(crate) type ElementIndexMap<E> = BTreeMap<E, i64>;

/// A handle identifying a rendered element (DOM node id, widget id, ...).
#[cfg(feature = "std")]
pub trait ElementKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<E: core::hash::Hash + Eq> ElementKey for E {}

/// A handle identifying a rendered element (DOM node id, widget id, ...).
#[cfg(not(feature = "std"))]
pub trait ElementKey: Ord {}
#[cfg(not(feature = "std"))]
impl<E: Ord> ElementKey for E {}
