//! Domain types shared by the pipeline stages

pub mod sex;
pub mod thyroid;

pub use sex::Sex;
pub use thyroid::ThyroidStatus;
