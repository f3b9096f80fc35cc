use diesel::sql_types::Text;

diesel::define_sql_function! {
    /// SQL `lower()` - used for case-insensitive employee code lookups.
    fn lower(value: Text) -> Text;
}
