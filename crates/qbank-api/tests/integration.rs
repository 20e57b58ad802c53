mod common;

mod question_tests;
