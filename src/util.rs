/// Convert an info log (or any name) written by OpenGL into a
/// `String`.
///
/// `written` is the length OpenGL reported, it is clamped to the
/// buffer. Anything from the first nul onwards is dropped as is
/// trailing whitespace (drivers like to end logs with a newline).
pub fn info_log_to_string(buffer: &[u8], written: usize) -> String {
    let buffer = &buffer[..written.min(buffer.len())];
    let buffer = match buffer.iter().position(|byte| *byte == 0) {
        Some(nul) => &buffer[..nul],
        None => buffer,
    };
    String::from_utf8_lossy(buffer).trim_end().to_string()
}

pub fn duration_to_string(duration: std::time::Duration) -> String {
    let time_taken = duration.as_secs_f64();
    if time_taken < 60.0 {
        format!("{:.3}s", time_taken)
    } else {
        format!("{:.0}m {:.2}s", (time_taken / 60.0).floor(), time_taken % 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_to_string_uses_written_length() {
        let buffer = b"0:1(10): error: syntax error\n\0garbage";
        assert_eq!(
            info_log_to_string(buffer, 29),
            "0:1(10): error: syntax error"
        );
    }

    #[test]
    fn info_log_to_string_stops_at_nul() {
        let buffer = b"in_pos\0\0\0\0";
        assert_eq!(info_log_to_string(buffer, buffer.len()), "in_pos");
    }

    #[test]
    fn info_log_to_string_clamps_length() {
        assert_eq!(info_log_to_string(b"abc", 100), "abc");
        assert_eq!(info_log_to_string(b"abc", 0), "");
    }

    #[test]
    fn duration_to_string_01() {
        assert_eq!(
            duration_to_string(std::time::Duration::from_millis(1500)),
            "1.500s"
        );
        assert_eq!(
            duration_to_string(std::time::Duration::from_secs(125)),
            "2m 5.00s"
        );
    }
}
