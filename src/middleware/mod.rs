/*
 * Responsibility
 * - middleware public interface
 */
pub mod http;
pub mod identity;
