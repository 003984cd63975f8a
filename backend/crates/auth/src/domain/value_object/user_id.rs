pub use kernel::id::UserId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_value() {
        let user_id = UserId::new(1);
        assert_eq!(user_id.value(), 1);
    }
}
