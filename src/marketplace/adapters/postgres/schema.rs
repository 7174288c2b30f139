//! Diesel schema for marketplace persistence.

diesel::table! {
    /// Posted task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Identity of the posting user.
        poster_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Budget lower bound in minor currency units.
        budget_min_cents -> Int8,
        /// Budget upper bound in minor currency units.
        budget_max_cents -> Int8,
        /// Optional category tag.
        #[max_length = 50]
        category -> Nullable<Varchar>,
        /// Optional advisory worker-type preference.
        #[max_length = 10]
        preferred_worker_type -> Nullable<Varchar>,
        /// Optional informational deadline.
        deadline -> Nullable<Date>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bid records referencing a task.
    bids (id) {
        /// Bid identifier.
        id -> Uuid,
        /// Owning task identifier.
        task_id -> Uuid,
        /// Identity of the submitting user.
        bidder_id -> Uuid,
        /// Bid amount in minor currency units.
        amount_cents -> Int8,
        /// Proposal text.
        proposal -> Text,
        /// Optional estimated effort in whole hours.
        estimated_hours -> Nullable<Int4>,
        /// Optional estimated completion date.
        estimated_completion -> Nullable<Date>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(bids -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(bids, tasks);
