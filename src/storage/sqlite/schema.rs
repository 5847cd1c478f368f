//! Diesel schema for the `SQLite` store.

diesel::table! {
    /// Registered companies.
    companies (id) {
        /// Row identifier.
        id -> BigInt,
        /// Registered legal name.
        legal_name -> Text,
        /// Unique tax registration number.
        tax_id -> Text,
    }
}

diesel::table! {
    /// Company branches.
    branches (id) {
        /// Row identifier.
        id -> BigInt,
        /// Owning company.
        company_id -> BigInt,
        /// Unique tax registration number.
        tax_id -> Text,
        /// Municipality.
        municipality -> Text,
        /// State abbreviation.
        state -> Text,
    }
}

diesel::table! {
    /// Task categories.
    categories (id) {
        /// Row identifier.
        id -> BigInt,
        /// Unique category name.
        name -> Text,
    }
}

diesel::table! {
    /// Task subcategories.
    subcategories (id) {
        /// Row identifier.
        id -> BigInt,
        /// Parent category.
        category_id -> BigInt,
        /// Subcategory name.
        name -> Text,
        /// Recurrence keyword.
        periodicity -> Text,
    }
}

diesel::table! {
    /// Registered users.
    users (id) {
        /// Row identifier.
        id -> BigInt,
        /// Display name.
        name -> Text,
        /// Unique email address.
        email -> Text,
    }
}

diesel::table! {
    /// Tasks.
    tasks (id) {
        /// Row identifier, never reused.
        id -> BigInt,
        /// Task title.
        title -> Text,
        /// Due date.
        due_date -> Date,
        /// Optional branch reference.
        branch_id -> Nullable<BigInt>,
        /// Optional subcategory reference.
        subcategory_id -> Nullable<BigInt>,
        /// Lifecycle status.
        status -> Text,
        /// Creation timestamp (UTC).
        created_at -> Timestamp,
        /// Completion timestamp (UTC).
        completed_at -> Nullable<Timestamp>,
    }
}
