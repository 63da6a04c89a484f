//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: Top status line
//! - `Bubble`: One chat message, or the typing indicator
//! - `MoodChart`: Seven-sample mood trend
//! - `ResourcePanelView`: Current support resources
//! - `RecordingModal`: Overlay while recording
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: Single-line text entry, locked while a reply is pending
//! - `MessageList`: Scrollable conversation view that follows new messages
//!
//! Each component file keeps its state types, event types, rendering,
//! event handling and tests together.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── input_box.rs
//! ├── mood_chart.rs
//! ├── resource_panel.rs
//! └── recording_modal.rs
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod mood_chart;
pub use mood_chart::MoodChart;
pub mod recording_modal;
pub use recording_modal::RecordingModal;
pub mod resource_panel;
pub use resource_panel::ResourcePanelView;
