mod concat;
mod empty;
mod lazy;
mod strict;

pub(crate) use concat::Concat;
pub(crate) use empty::Empty;
pub(crate) use lazy::{Lazy, Pulled, Source};
pub(crate) use strict::Strict;
