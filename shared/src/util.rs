//! Time, ID and phone utilities

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC timestamp as an RFC3339 string
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Current wall-clock time as "HH:MM" (what the kitchen display shows)
pub fn clock_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

/// Generate a timestamp-derived i64 for use as an order or menu item ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at single-restaurant scale)
///
/// Ordering by ID therefore orders by creation time.
pub fn next_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Normalize a phone number to its digits.
///
/// The digit string is the customer key in the store, so "(11) 98765-4321"
/// and "11987654321" address the same record. Idempotent.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_strips_non_digits() {
        assert_eq!(normalize_phone("(11) 98765-4321"), "11987654321");
        assert_eq!(normalize_phone("+55 11 9.8765.4321"), "5511987654321");
        assert_eq!(normalize_phone("abc"), "");
    }

    #[test]
    fn test_normalize_phone_idempotent() {
        let inputs = ["(11) 98765-4321", "11987654321", "", "++--"];
        for input in inputs {
            let once = normalize_phone(input);
            assert_eq!(normalize_phone(&once), once);
        }
    }

    #[test]
    fn test_next_id_is_increasing_across_ms() {
        // Two IDs generated in the same process are distinct with overwhelming
        // probability; IDs from different milliseconds are strictly ordered.
        let a = next_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = next_id();
        assert!(b > a);
    }
}
