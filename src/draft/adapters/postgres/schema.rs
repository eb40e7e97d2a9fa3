//! Diesel schema for draft review persistence.

diesel::table! {
    /// Draft tasks awaiting or past human review.
    draft_tasks (id) {
        /// Store-assigned draft identifier.
        id -> BigInt,
        /// Source channel the draft was ingested from.
        #[max_length = 50]
        source -> Varchar,
        /// Editable field payload.
        fields -> Jsonb,
        /// Classifier confidence, if reported.
        confidence -> Nullable<Float4>,
        /// Review status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Timestamptz,
    }
}
