//! Supporting utilities shared by models.

pub mod constraint;
