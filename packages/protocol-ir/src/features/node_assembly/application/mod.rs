/*
 * Node Assembly Application Layer
 */

mod assembler;

pub use assembler::NodeAssembler;
