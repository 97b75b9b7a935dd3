//! Diesel schema for board persistence.

diesel::table! {
    /// Board columns, soft-deleted rows included.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Column heading.
        #[max_length = 50]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Display order among live columns.
        sort_order -> Int4,
        /// Soft-delete timestamp.
        deleted_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Board tasks, soft-deleted rows included.
    board_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Owning column.
        column_id -> Uuid,
        /// Display order among live tasks of the column.
        sort_order -> Int4,
        /// Priority name.
        #[max_length = 16]
        priority -> Varchar,
        /// Status name.
        #[max_length = 16]
        status -> Varchar,
        /// Optional roster reference.
        #[max_length = 255]
        assignee_id -> Nullable<Varchar>,
        /// Soft-delete timestamp.
        deleted_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Versions of applied schema migrations.
    board_schema_migrations (version) {
        /// Migration directory name.
        #[max_length = 255]
        version -> Varchar,
        /// When the migration ran.
        run_on -> Timestamptz,
    }
}

diesel::joinable!(board_tasks -> board_columns (column_id));
diesel::allow_tables_to_appear_in_same_query!(board_columns, board_tasks);
