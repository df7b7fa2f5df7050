//! Contains the implementations of the elementary functions and of the
//! constant table.

mod constants;
mod exp;
mod functions;
mod gamma;
mod round;
mod trig;
