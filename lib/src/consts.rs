use std::ops::RangeInclusive;

/// Location of backlight devices
pub const DEVICES_PATH: &str = "/sys/class/backlight";

/// Filename for device's max brightness
pub const FILE_MAX_BRIGHTNESS: &str = "max_brightness";

/// Filename for current brightness.
pub const FILE_BRIGHTNESS: &str = "actual_brightness";

/// amdgpu drivers set the actual_brightness in a different scale than
/// [0, max_brightness], so we have to use the 'brightness' file instead.
/// This may be fixed in the new 5.7 kernel?
pub const FILE_BRIGHTNESS_AMD: &str = "brightness";

/// Raw values the amdgpu panel firmware actually lands on, paired with the
/// percent each step represents. The raw scale does not divide evenly into
/// percentage points, so these are matched exactly before falling back to a
/// proportional estimate. Ordered by raw value.
pub const KNOWN_STEPS: [(u32, u8); 21] = [
    (40, 0),
    (57, 5),
    (80, 10),
    (113, 15),
    (159, 20),
    (223, 25),
    (313, 30),
    (440, 35),
    (617, 40),
    (867, 45),
    (1217, 50),
    (1386, 55),
    (1578, 60),
    (1797, 65),
    (2047, 70),
    (2331, 75),
    (2655, 80),
    (3023, 85),
    (3443, 90),
    (3755, 95),
    (4095, 100),
];

/// Range of valid values for `read_timeout` (seconds)
pub const READ_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=60;
