pub(crate) mod hit;
pub(crate) mod ray;
pub(crate) mod shape;
pub(crate) mod sphere;
