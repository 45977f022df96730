//! AgentCast: client for an AI podcast generation service.
//!
//! * [`podcast`]: request, script and result types.
//! * [`api`]: the generation / translation / text-to-speech service client.
//! * [`pipeline`]: the request orchestrator and its session state.
//! * [`reveal`]: timed, cancellable typewriter reveal of a transcript.
//! * [`export`]: transcript and audio downloads.
//! * [`config`]: TOML settings and platform paths.
//! * [`cli`]: command-line arguments for the `agentcast` binary.

pub mod api;
pub mod cli;
pub mod config;
pub mod export;
pub mod pipeline;
pub mod podcast;
pub mod reveal;
