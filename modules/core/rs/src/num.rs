use std::fmt::{Debug, Display};
use std::hash::Hash;

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Display + Default + Hash {}
impl<T: ::num::PrimInt + Debug + Display + Default + Hash> PrimInt for T {}

/// T values are non-negative primitive integers, used to store occurrence counts
pub trait PrimUInt: PrimInt + ::num::Unsigned + Send + Sync {}

impl<T: PrimInt + ::num::Unsigned + Send + Sync> PrimUInt for T {}
