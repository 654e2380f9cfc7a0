//! Release service and repository URLs

/// GitHub API base for the ESP-IDF repository
pub const RELEASES_API: &str = "https://api.github.com/repos/espressif/esp-idf";

/// ESP-IDF git repository cloned by `idfmgr install`
pub const ESP_IDF_REPO: &str = "https://github.com/espressif/esp-idf.git";

/// Arduino core added as a component by `idfmgr create --arduino`
pub const ARDUINO_ESP32_REPO: &str = "https://github.com/espressif/arduino-esp32.git";
