#![forbid(unsafe_code)]

//! Declarative layout resolution.
//!
//! Tessera composes UI regions from three nested primitives: a
//! [`Container`] holds [`Section`]s, and a section holds [`Locator`]s.
//! Positioning is declared per breakpoint, in logical design coordinates,
//! and through width-conditioned rules. The [`LayoutEngine`] resolves all
//! of it into concrete styles for a render sink.
//!
//! # Example
//!
//! ```
//! use tessera::{Container, EngineConfig, LayoutEngine, Locator, Section};
//! use tessera::layout::{Dimension, LogicalRect, LogicalSize};
//!
//! let container = Container::new("page").section(
//!     Section::free("hero", LogicalSize::new(800.0, 600.0))
//!         .locator(Locator::new("title").logical(LogicalRect::new(100.0, 120.0, 380.0, 200.0))),
//! );
//!
//! let mut engine = LayoutEngine::new(EngineConfig::default());
//! engine.set_viewport_width(1024.0);
//! let resolved = engine.resolve(&container).unwrap();
//! let hero = resolved.sections[0].as_ref().unwrap();
//! assert_eq!(hero.children[0].style.left, Some(Dimension::Percent(12.5)));
//! ```
//!
//! # Crates
//! - [`tessera_layout`] (re-exported as [`layout`]): the pure core.
//! - [`tessera_paging`] (re-exported as [`paging`]): the paging state machine.

pub mod config;
pub mod engine;
pub mod error;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod notify;
pub mod section;

pub use tessera_layout as layout;
pub use tessera_paging as paging;

pub use config::{
    Container, ContainerFrame, EngineConfig, FailurePolicy, LoadConfig, Locator, Section,
    SectionFrame,
};
pub use engine::{LayoutEngine, ResolvedContainer, SectionOutcome};
pub use error::{ConfigError, LayoutError};
pub use notify::{LayoutObserver, NoopObserver, Notification, RecordingObserver};
pub use section::{
    PagingSnapshot, RenderedLocator, ResolvedSection, SectionContext, describe_locator,
    resolve_section,
};
