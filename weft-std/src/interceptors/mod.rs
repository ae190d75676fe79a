//! Ready-made interceptors: call logging, call tracing, and timing.

mod logging;
mod timing;
mod trace;

pub use logging::CallLoggingInterceptor;
pub use timing::{STARTED_AT_KEY, TimingInterceptor};
pub use trace::CallTraceInterceptor;
