pub mod basic_pass;
