/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

pub mod custom_error;
pub mod dictionary;
pub mod index_manager;
pub mod parser;
pub mod pattern_matcher;
pub mod query;
pub mod query_engine;
pub mod results;
pub mod solution;
pub mod terms;
pub mod triple;
pub mod triple_store;

pub use custom_error::{StoreError, TriplePosition};
pub use query::{ConstructQuery, Projection, Query, QueryResults, SelectQuery};
pub use query_engine::{execute, QueryEngine};
pub use solution::SolutionMapping;
pub use terms::{LiteralTag, Term};
pub use triple::{Triple, TriplePattern};
pub use triple_store::TripleStore;
