mod diag;
mod output;

pub use diag::Thread as DiagThread;
pub use output::Thread as OutputThread;
