//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Submitted tasks and their lifecycle status.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Uuid,
        /// Caller-supplied unique identifier.
        #[max_length = 255]
        external_id -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Positive effort estimate in minutes.
        estimated_minutes -> Int4,
        /// Task lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Submission timestamp.
        submitted_at -> Timestamptz,
    }
}
