/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// package tree providers, license file access, console output and
/// document formatters.
pub mod outbound;
