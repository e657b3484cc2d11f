pub mod nucleotide;
pub mod num;
pub mod parallelism;
