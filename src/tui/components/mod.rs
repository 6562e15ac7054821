//! # TUI Components
//!
//! Everything drawn on screen.
//!
//! ## Stateless (props only)
//!
//! - `TitleBar`: product name, service health, status line
//! - `StatsPanel`: session count and current emotion
//! - `Message`: a single chat bubble
//! - `TrendModal`: the emotion-frequency overlay
//!
//! ## Stateful
//!
//! - `InputBox`: owns the text buffer and cursor, emits `InputEvent`
//! - `MessageList`: transient wrapper over `MessageListState` (scroll + layout cache)
//!
//! Each file keeps its state types, event types, rendering, event handling and
//! tests together. Components take their data as props rather than reaching
//! into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── stats_panel.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── trend_modal.rs
//! └── input_box/       (editing + wrap/cursor geometry)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::{InputBox, InputEvent};
pub mod message;
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod stats_panel;
pub use stats_panel::StatsPanel;
pub mod trend_modal;
pub use trend_modal::{ModalClick, TrendModal};
