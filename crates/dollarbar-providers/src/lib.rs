//! Data provider seams
//!
//! Network access and exchange calendars live outside this workspace. This
//! crate defines the traits they plug into and the orchestration around
//! them.
//!
//! ## Components
//!
//! - `calendar` - `TradingCalendar` trait and a fixed-hours weekday calendar
//! - `source` - `BarSource` trait for one-session bar fetches
//! - `throttle` - minimum spacing between request starts
//! - `historical` - sequential session-by-session loader
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dollarbar_providers::{FixedSessionCalendar, HistoricalBarLoader, RequestThrottle};
//!
//! let calendar = FixedSessionCalendar::new(open, close)?;
//! let throttle = RequestThrottle::per_window(200, Duration::from_secs(60));
//! let loader = HistoricalBarLoader::new(my_source, calendar, throttle);
//! let time_bars = loader.load("SPY", start, end).await?;
//! ```

pub mod calendar;
pub mod historical;
pub mod source;
pub mod throttle;

pub use calendar::{CalendarError, FixedSessionCalendar, Session, TradingCalendar};
pub use historical::{HistoricalBarLoader, HistoricalError};
pub use source::BarSource;
pub use throttle::RequestThrottle;
