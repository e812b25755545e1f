//! Navigation core
//!
//! input adapter -> [`NavigationEvent`] -> [`EventQueue`] (debounce)
//! -> [`NavigationEventProcessor`] -> state manager / UI adapter / lifecycle hooks

pub mod adapter;
pub mod bundle;
pub mod controller;
pub mod event;
pub mod grace;
pub mod processor;
pub mod queue;
pub mod stack;
pub mod state;

pub use adapter::FragmentNavigationAdapter;
pub use bundle::{Bundle, BundleValue};
pub use controller::NavigationController;
pub use event::{Direction, EventKind, InputSource, MenuState, MenuType, NavigationEvent};
pub use grace::KeyInterceptor;
pub use processor::{MenuClosedCallback, MenuOpenedCallback, NavigationEventProcessor};
pub use queue::{EventQueue, QueueStats};
pub use stack::NavigationStack;
pub use state::NavigationStateManager;
