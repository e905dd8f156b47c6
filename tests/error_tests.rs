// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_advisor::error::{
    config_error, explain_error, file_read_error, llm_api_error, query_parse_error
};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/file.sql", io_error);
    let _msg = error.to_string();
}

#[test]
fn test_query_parse_error() {
    let error = query_parse_error("Unexpected token");
    let _msg = error.to_string();
}

#[test]
fn test_query_parse_error_with_position() {
    let error = query_parse_error("Expected: ), found: EOF at Line: 3, Column: 25");
    let _msg = error.to_string();
}

#[test]
fn test_llm_api_error() {
    let error = llm_api_error("Ollama API error 503: busy");
    let _msg = error.to_string();
}

#[test]
fn test_explain_error() {
    let error = explain_error("EXPLAIN expects exactly one statement, got 2");
    let _msg = error.to_string();
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid configuration value");
    let _msg = error.to_string();
}

#[test]
fn test_position_extraction_large_numbers() {
    let error = query_parse_error("Error at Line: 999, Column: 12345");
    let _msg = error.to_string();
}
