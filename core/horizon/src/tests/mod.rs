mod state_machine_tests;
mod support;
