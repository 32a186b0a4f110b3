//! AES-128-ECB 解密与 PKCS#7 去填充

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, KeyInit};
use aes::Aes128;

use crate::error::{Error, Result};

/// AES 分组长度
pub const BLOCK_LEN: usize = 16;

/// 就地解密并返回去填充后的明文长度
///
/// # Errors
/// 密文为空或未按分组对齐、填充非法时返回 `BadAes`。
pub fn decrypt_ecb_in_place(key: &[u8; 16], buf: &mut [u8]) -> Result<usize> {
    if buf.is_empty() || buf.len() % BLOCK_LEN != 0 {
        return Err(Error::BadAes);
    }
    let cipher = Aes128::new(GenericArray::from_slice(key));
    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }
    unpad(buf)
}

/// 解密到新缓冲区
///
/// # Errors
/// 同 [`decrypt_ecb_in_place`]。
pub fn decrypt_ecb(key: &[u8; 16], data: &[u8]) -> Result<Vec<u8>> {
    let mut buf = data.to_vec();
    let len = decrypt_ecb_in_place(key, &mut buf)?;
    buf.truncate(len);
    Ok(buf)
}

fn unpad(buf: &[u8]) -> Result<usize> {
    let Some(&pad) = buf.last() else {
        return Err(Error::BadAes);
    };
    let pad = usize::from(pad);
    if pad == 0 || pad > BLOCK_LEN || pad > buf.len() {
        return Err(Error::BadAes);
    }
    let body = buf.len() - pad;
    if buf[body..].iter().any(|&b| usize::from(b) != pad) {
        return Err(Error::BadAes);
    }
    Ok(body)
}

/// 测试用：PKCS#7 填充后 ECB 加密
#[cfg(test)]
pub(crate) fn encrypt_ecb(key: &[u8; 16], data: &[u8]) -> Vec<u8> {
    use aes::cipher::BlockEncrypt;

    let pad = BLOCK_LEN - data.len() % BLOCK_LEN;
    let mut buf = data.to_vec();
    #[allow(clippy::cast_possible_truncation)]
    buf.resize(data.len() + pad, pad as u8);
    let cipher = Aes128::new(GenericArray::from_slice(key));
    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    buf
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const KEY: &[u8; 16] = b"0123456789abcdef";

    #[test]
    fn test_fips197_vector() {
        // FIPS-197 附录 C.1
        let key: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
            .unwrap()
            .try_into()
            .unwrap();
        let mut block = hex::decode("69c4e0d86a7b0430d8cdb78070b4c55a").unwrap();
        // 附加一个全填充分组，使去填充合法
        let mut pad_block = encrypt_ecb(&key, &[]);
        block.append(&mut pad_block);
        let plain = decrypt_ecb(&key, &block).unwrap();
        assert_eq!(hex::encode(plain), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn test_decrypt_strips_padding() {
        for len in [0usize, 1, 15, 16, 17, 40] {
            let plain: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
            let cipher = encrypt_ecb(KEY, &plain);
            assert_eq!(cipher.len() % BLOCK_LEN, 0);
            assert_eq!(decrypt_ecb(KEY, &cipher).unwrap(), plain);
        }
    }

    #[test]
    fn test_misaligned_or_empty() {
        assert_eq!(decrypt_ecb(KEY, &[]), Err(Error::BadAes));
        assert_eq!(decrypt_ecb(KEY, &[0u8; 17]), Err(Error::BadAes));
    }

    #[test]
    fn test_bad_padding() {
        assert_eq!(unpad(&[1, 2, 3, 0]), Err(Error::BadAes));
        assert_eq!(unpad(&[17; 16]), Err(Error::BadAes));
        assert_eq!(unpad(&[9, 9, 3, 2]), Err(Error::BadAes));
        assert_eq!(unpad(&[9, 2, 2]), Ok(1));
        assert_eq!(unpad(&[16; 16]), Ok(0));
    }

    #[test]
    fn test_wrong_key_fails_padding() {
        let cipher = encrypt_ecb(KEY, b"a short message");
        assert_eq!(decrypt_ecb(b"fedcba9876543210", &cipher), Err(Error::BadAes));
    }
}
