//! # zagi-agent
//!
//! Works out which tool is driving zagi and where that tool keeps its
//! session transcript.
//!
//! - [`is_agent_mode`] and [`detect`] read the environment through [`Env`]
//! - [`read_session`] turns an agent's transcript into a JSON array

mod agent;
pub mod claude;
mod detect;
mod env;
mod error;
pub mod opencode;
mod session;

pub use agent::Agent;
pub use detect::{
    detect, is_agent_mode, AGENT_OVERRIDE, CLAUDE_SIGNAL, IDE_ASKPASS_NODE, OPENCODE_SIGNAL,
    TERM_PROGRAM,
};
pub use env::{Env, MapEnv, ProcessEnv};
pub use error::SessionError;
pub use session::{json_array, read_session, Session};
