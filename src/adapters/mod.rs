//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements   | Connects to                   |
//! |-------------|--------------|-------------------------------|
//! | `env`       | EnvPort      | `std::env`                    |
//! | `log_sink`  | EventSink    | `log` facade                  |
//! | `process`   | ProcessPort  | `std::process::exit`          |
//! | `timer`     | TimerPort    | sleeper threads / manual queue|

pub mod env;
pub mod log_sink;
pub mod process;
pub mod timer;
