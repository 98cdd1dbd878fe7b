//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: migrated PostgreSQL container with automatic cleanup (feature: "postgres")
//! - `TestDataBuilder`: deterministic, collision-free test data
//! - `assertions`: assertion helpers with readable failure messages
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let username = builder.username("alice");
//!     let email = builder.email("alice");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data seeded from the test name.
///
/// Two tests sharing one database never produce the same username or email.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_register_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Short hex tag derived from the seed
    fn tag(&self) -> String {
        format!("{:08x}", self.seed as u32)
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(1);
    /// assert_eq!(builder.username("alice"), "alice_00000001");
    /// ```
    pub fn username(&self, base: &str) -> String {
        format!("{}_{}", base, self.tag())
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(1);
    /// assert_eq!(builder.email("alice"), "alice+00000001@example.com");
    /// ```
    pub fn email(&self, base: &str) -> String {
        format!("{}+{}@example.com", base, self.tag())
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `later` is not before `earlier` (timestamps, ids)
    pub fn assert_not_before<T: PartialOrd + std::fmt::Debug>(later: T, earlier: T, context: &str) {
        assert!(
            later >= earlier,
            "{}: expected {:?} >= {:?}",
            context,
            later,
            earlier
        );
    }
}
