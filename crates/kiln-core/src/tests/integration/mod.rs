pub mod host_tests;
