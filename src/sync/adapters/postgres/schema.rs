//! Diesel schema for contact and validation persistence.

diesel::table! {
    /// Contact profiles mirrored from the CRM.
    contacts (contact_id) {
        /// CRM contact identifier.
        #[max_length = 100]
        contact_id -> Varchar,
        /// Email address.
        #[max_length = 320]
        email -> Varchar,
        /// Optional first name.
        #[max_length = 255]
        firstname -> Nullable<Varchar>,
        /// Optional last name.
        #[max_length = 255]
        lastname -> Nullable<Varchar>,
        /// Last write timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Latest validation report per contact.
    validation_results (contact_id) {
        /// CRM contact identifier.
        #[max_length = 100]
        contact_id -> Varchar,
        /// Validated email address.
        #[max_length = 320]
        email -> Varchar,
        /// Domain the checks ran against.
        #[max_length = 253]
        domain -> Varchar,
        /// MX verdict.
        mx_valid -> Bool,
        /// Disposable verdict.
        is_disposable -> Bool,
        /// Blacklist verdict.
        is_blacklisted -> Bool,
        /// Free-provider verdict.
        is_free_provider -> Bool,
        /// Derived status.
        #[max_length = 16]
        validation_status -> Varchar,
        /// Derived message.
        validation_message -> Text,
        /// Evaluation timestamp.
        evaluated_at -> Timestamptz,
    }
}

diesel::joinable!(validation_results -> contacts (contact_id));
diesel::allow_tables_to_appear_in_same_query!(contacts, validation_results);
