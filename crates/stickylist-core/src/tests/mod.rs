mod fixtures;

mod bridge_tests;
mod controller_tests;
