pub(crate) mod container;
pub(crate) mod graphics;
pub(crate) mod pool;
