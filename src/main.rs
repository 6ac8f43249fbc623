use std::any::Any;
use std::process::ExitCode;

use interest_schedule::error::AppError;

fn main() -> ExitCode {
    let result = std::panic::catch_unwind(interest_schedule::app::run)
        .unwrap_or_else(|payload| Err(AppError::unexpected(panic_message(payload.as_ref()))));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "internal error".to_string())
}
