//! Fixed endpoint paths and the browser-impersonation header set.

pub const TASK_LOAD: &str = "/web/task/load";
pub const SIGN_RECORD: &str = "/web/task/sign/sign-record";
pub const SIGN_PAGE: &str = "/web/task/sign/sign-page";
pub const SIGN_IN: &str = "/web/task/sign/sign-in";
pub const BLIND_BOX_COUNT: &str = "/web/rights/blind-box/user/count";
pub const BLIND_BOX_RECEIVE: &str = "/web/rights/blind-box/receive";
pub const MEMBER_DETAIL: &str = "/web/member/consumer/detail";
pub const RECEIVE_RIGHTS: &str = "/web/member/receiveRights";

pub const H5_ORIGIN: &str = "https://h5-app.jetour.com.cn";
pub const USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 18_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 ios/1.0.0";

/// Static headers sent with every request.
///
/// `Host` comes from the request URL and `Accept-Encoding` is negotiated by curl
/// so that compressed bodies are decoded transparently.
pub fn default_headers() -> Vec<(String, String)> {
    [
        ("Accept", "*/*"),
        ("Accept-Language", "zh-CN,zh"),
        ("Content-Type", "application/json"),
        ("Origin", H5_ORIGIN),
        ("Referer", "https://h5-app.jetour.com.cn/"),
        ("Connection", "keep-alive"),
        ("User-Agent", USER_AGENT),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_impersonate_h5_app() {
        let h = default_headers();
        assert!(h.iter().any(|(k, v)| k == "Origin" && v == H5_ORIGIN));
        assert!(h.iter().any(|(k, v)| k == "User-Agent" && v.contains("iPhone")));
        assert!(h.iter().all(|(k, _)| k != "Host"));
    }
}
