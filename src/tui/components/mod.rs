//! # TUI Components
//!
//! Stateless, props-based widgets for the host simulator.
//!
//! - `TitleBar`: push policy, status message, sync warning
//! - `StackPanel`: one navigation path, top of stack first
//! - `KeyHints`: key bindings
//!
//! Components receive external data as props (struct fields), never by
//! reaching into the router. `ui::draw_ui` is the only place that reads the
//! router and turns paths into rows.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── stack_panel.rs   (One path as a list)
//! └── key_hints.rs     (Bottom help line)
//! ```

pub mod key_hints;
pub mod stack_panel;
pub mod title_bar;

pub use key_hints::KeyHints;
pub use stack_panel::{StackPanel, StackRow};
pub use title_bar::TitleBar;
