//! CSS selector to XPath translation
//!
//! Automation nodes address page elements with a small CSS subset. The browser
//! driver only speaks XPath, so selectors are rewritten before being handed off.
//!
//! # Supported syntax
//!
//! - Child combinator: `a > b`
//! - Id: `#main`
//! - Class: `.item`
//! - Tag with one class: `span.active`
//! - Bare tag: `div`
//!
//! Attribute selectors, pseudo-classes and multi-class compounds are not
//! modeled; anything unrecognized passes through as a tag name.
//!
//! # Example
//!
//! ```
//! use flow_resolve::selector::to_xpath;
//!
//! assert_eq!(to_xpath("#main > div"), "//*[@id='main']/div");
//! ```

mod xpath;

pub use xpath::{Segment, parse, to_xpath};
