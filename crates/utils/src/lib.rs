use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";

/// Number of seconds in one day
pub const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Creates an alphanumeric secret, e.g. for signing feedback tokens when
/// no secret has been configured
pub fn create_random_secret(secret_len: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..secret_len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Converts a number of days into seconds
pub fn days_to_secs(days: i64) -> i64 {
    days * SECONDS_PER_DAY
}

/// Epoch seconds of a millisecond timestamp
pub fn millis_to_secs(millis: i64) -> i64 {
    millis.div_euclid(1000)
}
