//! Integration tests: the HTTP client and the console screens against an
//! in-process fake of the library backend.

mod api_tests;
mod backend;
mod console_tests;
