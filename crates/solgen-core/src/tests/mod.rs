/*! Test coverage for the declaration arena, type model and settings.
 *
 * Code generation trusts these structures completely, so linearization validation, override
 * parameter matching, storage offsets and configuration loading are checked here on their own.
 */

mod storage_tests;
