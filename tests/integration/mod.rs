mod session_flow;
mod export_flow;
mod pacing;
