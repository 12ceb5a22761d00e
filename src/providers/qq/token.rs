//! 从 `qrsig` 会话签名推导 `ptqrtoken` 的哈希函数。
//!
//! 这是远端服务器校验用的协议要求，不是内部的正确性机制：
//! 经典的 "乘 33" 弱哈希，必须按 32 位回绕语义逐位复刻，
//! 不能替换成更强的哈希。

/// 从会话签名推导轮询令牌。
///
/// 累加器从 0 开始，对每个字符执行
/// `acc = (acc << 5) + acc + 字符码`（32 位回绕），
/// 最后与 `0x7FFF_FFFF` 按位与清掉符号位。
///
/// 任何输入（包括空串）都能得到一个令牌，空串得到 0。
#[must_use]
pub fn derive_token(session_signature: &str) -> u32 {
    let mut hash: u32 = 0;
    for c in session_signature.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(c as u32);
    }
    hash & 0x7FFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signature_yields_zero() {
        assert_eq!(derive_token(""), 0);
    }

    #[test]
    fn test_known_signatures() {
        // 与原始 JS 实现逐一比对过的样例值
        assert_eq!(derive_token("hello"), 127_086_708);
        assert_eq!(derive_token("Af7*dJ0q"), 736_565_527);
        assert_eq!(
            derive_token("tPzjtGYHGPyV0sZqbcXO5LhIOpKBmBDkUQvrSkQzZ8Y_"),
            756_579_553
        );
    }

    #[test]
    fn test_deterministic() {
        let sig = "abc123XYZ";
        assert_eq!(derive_token(sig), derive_token(sig));
        assert_eq!(derive_token(sig), 1_326_634_919);
    }
}
