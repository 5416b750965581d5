// User agent classification
// Case-insensitive substring matching with a fixed priority order;
// the first rule that matches wins

use crate::value_objects::{BrowserFamily, DeviceClass, OsFamily};

// Edge and Opera ship "chrome" in their UA, Yandex ships "chrome" and
// "safari", Chrome ships "safari". Order carries the disambiguation.
const BROWSER_RULES: [(&str, BrowserFamily); 7] = [
    ("edg/", BrowserFamily::Edge),
    ("opr/", BrowserFamily::Opera),
    ("opera", BrowserFamily::Opera),
    ("yabrowser", BrowserFamily::YandexBrowser),
    ("firefox", BrowserFamily::Firefox),
    ("chrome", BrowserFamily::Chrome),
    ("safari", BrowserFamily::Safari),
];

// iOS agents contain "mac os x", Android agents contain "linux".
// The mobile entries must come first.
const OS_RULES: [(&str, OsFamily); 8] = [
    ("windows", OsFamily::Windows),
    ("android", OsFamily::Android),
    ("iphone", OsFamily::Ios),
    ("ipad", OsFamily::Ios),
    ("ipod", OsFamily::Ios),
    ("mac os x", OsFamily::MacOs),
    ("macintosh", OsFamily::MacOs),
    ("linux", OsFamily::Linux),
];

pub fn classify_browser(user_agent: &str) -> BrowserFamily {
    let ua = user_agent.to_lowercase();
    for (needle, family) in BROWSER_RULES {
        if ua.contains(needle) {
            return family;
        }
    }
    BrowserFamily::Unknown
}

pub fn classify_os(user_agent: &str) -> OsFamily {
    let ua = user_agent.to_lowercase();
    for (needle, family) in OS_RULES {
        if ua.contains(needle) {
            return family;
        }
    }
    OsFamily::Unknown
}

/// Tablet markers are checked before phone markers; an Android agent
/// without the "mobile" token is a tablet.
pub fn classify_device(user_agent: &str) -> DeviceClass {
    let ua = user_agent.to_lowercase();
    if ua.contains("ipad") || ua.contains("tablet") {
        return DeviceClass::Tablet;
    }
    if ua.contains("android") && !ua.contains("mobile") {
        return DeviceClass::Tablet;
    }
    if ua.contains("mobi") || ua.contains("iphone") || ua.contains("ipod") || ua.contains("android")
    {
        return DeviceClass::Mobile;
    }
    DeviceClass::Desktop
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";
    const EDGE_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36 Edg/125.0.2535.51";
    const YANDEX_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 YaBrowser/24.6.0.0 Safari/537.36";
    const OPERA_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 OPR/110.0.0.0";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";
    const SAFARI_IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";
    const FIREFOX_LINUX: &str = "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:126.0) Gecko/20100101 Firefox/126.0";
    const CHROME_ANDROID_PHONE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Mobile Safari/537.36";
    const CHROME_ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 14; SM-X910) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

    #[test]
    fn edge_wins_over_embedded_chrome_token() {
        assert_eq!(classify_browser(EDGE_WIN), BrowserFamily::Edge);
    }

    #[test]
    fn yandex_wins_over_chrome_and_safari_tokens() {
        assert_eq!(classify_browser(YANDEX_WIN), BrowserFamily::YandexBrowser);
    }

    #[test]
    fn opera_detected_by_opr_token() {
        assert_eq!(classify_browser(OPERA_MAC), BrowserFamily::Opera);
    }

    #[test]
    fn chrome_wins_over_trailing_safari_token() {
        assert_eq!(classify_browser(CHROME_WIN), BrowserFamily::Chrome);
    }

    #[test]
    fn plain_safari_is_safari() {
        assert_eq!(classify_browser(SAFARI_IPHONE), BrowserFamily::Safari);
    }

    #[test]
    fn firefox_detected() {
        assert_eq!(classify_browser(FIREFOX_LINUX), BrowserFamily::Firefox);
    }

    #[test]
    fn unmatched_agent_is_unknown() {
        assert_eq!(classify_browser("curl/8.5.0"), BrowserFamily::Unknown);
    }

    #[test]
    fn ios_wins_over_mac_os_x_token() {
        assert_eq!(classify_os(SAFARI_IPHONE), OsFamily::Ios);
        assert_eq!(classify_os(SAFARI_IPAD), OsFamily::Ios);
    }

    #[test]
    fn android_wins_over_linux_token() {
        assert_eq!(classify_os(CHROME_ANDROID_PHONE), OsFamily::Android);
    }

    #[test]
    fn desktop_os_families_detected() {
        assert_eq!(classify_os(CHROME_WIN), OsFamily::Windows);
        assert_eq!(classify_os(OPERA_MAC), OsFamily::MacOs);
        assert_eq!(classify_os(FIREFOX_LINUX), OsFamily::Linux);
    }

    #[test]
    fn ipad_is_a_tablet() {
        assert_eq!(classify_device(SAFARI_IPAD), DeviceClass::Tablet);
    }

    #[test]
    fn android_without_mobile_token_is_a_tablet() {
        assert_eq!(classify_device(CHROME_ANDROID_TABLET), DeviceClass::Tablet);
    }

    #[test]
    fn android_with_mobile_token_is_a_phone() {
        assert_eq!(classify_device(CHROME_ANDROID_PHONE), DeviceClass::Mobile);
    }

    #[test]
    fn iphone_is_mobile_and_desktop_is_the_fallback() {
        assert_eq!(classify_device(SAFARI_IPHONE), DeviceClass::Mobile);
        assert_eq!(classify_device(CHROME_WIN), DeviceClass::Desktop);
        assert_eq!(classify_device(""), DeviceClass::Desktop);
    }
}
