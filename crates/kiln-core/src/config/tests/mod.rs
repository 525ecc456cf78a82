pub mod data_tests;
