//! # pagelens
#![allow(clippy::uninlined_format_args)]
//!
//! Page snapshots for LLM browsing agents.
//!
//! Reduces a live web page to two things an agent can act on: the visible
//! content as Markdown, and a numbered list of the interactive
//! elements in view. Each index maps back to the live element, so an
//! agent can say "click 3" or "type into 5".
//!
//! ## CLI Usage
//!
//! ```bash
//! # Content plus interactive elements, as JSON
//! pagelens view "https://example.com"
//!
//! # Just the numbered element list
//! pagelens elements "https://example.com" --format simple
//! # 0:<a>More information...</a>
//!
//! # Act on an index from that list
//! pagelens click "https://example.com" --index 0
//! pagelens type "https://duckduckgo.com" --index 1 "rust webdriver" --enter
//! pagelens select "https://example.com/form" --index 4 --option 2
//!
//! # Click at viewport coordinates instead
//! pagelens click "https://example.com" --x 120 --y 48
//!
//! # Run JavaScript and read back what it logged
//! pagelens eval "https://example.com" "console.log(document.title)" --unsafe-eval
//!
//! # Scroll and screenshot
//! pagelens scroll "https://example.com" --down
//! pagelens screenshot "https://example.com" -o page.png --full-page
//! ```
//!
//! ### Browser and Viewport Options
//!
//! ```bash
//! # Use Firefox instead of Chrome (default)
//! pagelens view "https://example.com" --browser firefox
//!
//! # Set custom viewport size
//! pagelens view "https://example.com" --viewport 375x667
//!
//! # Run in visible mode (not headless)
//! pagelens view "https://example.com" --no-headless
//! ```
//!
//! Settings can also live in `~/.pagelens/config.json`; command-line flags
//! win over the file.
//!
//! ## Library Usage
//!
//! The snapshot logic runs on a plain [`Document`] model, so it works
//! without a browser:
//!
//! ```
//! use pagelens::{Document, Element, Rect, Viewport};
//! use pagelens::{capture_interactive_elements, capture_visible_content};
//!
//! let mut builder = Document::builder(Viewport::new(800.0, 600.0));
//! builder.push(
//!     Element::new("button")
//!         .with_text("Save")
//!         .with_rect(Rect::new(10.0, 10.0, 80.0, 24.0)),
//! );
//! let document = builder.build();
//!
//! let found = capture_interactive_elements(&document);
//! assert_eq!(found.records()[0].text, "Save");
//! assert_eq!(capture_visible_content(&document).parts().len(), 1);
//! ```
//!
//! Against a live page, [`PageSession`] does the collection and keeps the
//! index between calls:
//!
//! ```no_run
//! use pagelens::{Config, PageSession, Target};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load(None)?;
//! let mut session = PageSession::open(&config).await?;
//!
//! let lines = session.navigate("https://example.com").await?;
//! println!("{}", lines.join("\n"));
//! session.click(Target::Index(0)).await?;
//!
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

/// Settings file and command-line overrides
pub mod config;

/// Page console mirroring
pub mod console;

/// Element and document model
pub mod dom;

/// Error types with exit codes
pub mod errors;

/// Interactive element discovery and indexing
pub mod indexer;

/// Display labels for interactive elements
pub mod labels;

/// Browser page session
pub mod session;

/// Visible content extraction
pub mod snapshot;

/// Shared output types
pub mod types;

/// Viewport and style visibility rules
pub mod visibility;

/// WebDriver browser control
pub mod webdriver;

pub use config::{Config, ConfigOverrides};
pub use console::{Console, ConsoleBuffer, ConsoleMirror, TracingConsole};
pub use dom::{ComputedStyle, Document, Element, NodeId, Rect, SnapshotError, Viewport};
pub use errors::PagelensError;
pub use indexer::{Indexer, InteractiveElements, capture_interactive_elements};
pub use labels::{LabelResolver, LabelStrategy};
pub use session::{PageSession, Target};
pub use snapshot::{VisibleFragment, capture_visible_content};
pub use types::{InteractiveElement, OutputFormat, PageView, ViewportSize};
pub use visibility::is_visible;
pub use webdriver::{Browser, BrowserType};
