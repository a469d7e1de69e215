// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod errors;
pub mod forms;
pub mod ids;
pub mod model;
pub mod session;
pub mod state;

pub use catalog::*;
pub use errors::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use session::*;
pub use state::*;
