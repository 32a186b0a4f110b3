//! C FFI 导出
//!
//! 提供 C ABI 接口供 WebAssembly 宿主 / ObjC / Swift 等调用。
//! 输入缓冲区按字节复制进来，输出缓冲区由本库分配，须用
//! [`ncm_output_free`] 释放。

// FFI 模块需要 unsafe 代码
#![allow(unsafe_code)]

use std::ffi::c_char;
use std::ptr;
use std::slice;

use crate::decoder;
use crate::error::Error;

/// FFI 返回码
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NcmStatus {
    Success = 0,
    UnexpectedEof = -1,
    BadMagic = -2,
    BadAes = -3,
    BadBase64 = -4,
    BadLength = -5,
    BadMetadata = -6,
    NullPointer = -7,
}

impl From<Error> for NcmStatus {
    fn from(err: Error) -> Self {
        match err {
            Error::UnexpectedEof => Self::UnexpectedEof,
            Error::BadMagic => Self::BadMagic,
            Error::BadAes => Self::BadAes,
            Error::BadBase64 => Self::BadBase64,
            Error::BadLength => Self::BadLength,
            Error::BadMetadata => Self::BadMetadata,
        }
    }
}

/// 解码输出
#[repr(C)]
#[derive(Debug)]
pub struct NcmOutput {
    /// 0 = MP3, 1 = FLAC
    pub format: u8,
    pub audio_ptr: *mut u8,
    pub audio_len: usize,
    /// 无封面时为空指针
    pub cover_ptr: *mut u8,
    pub cover_len: usize,
}

impl NcmOutput {
    const fn empty() -> Self {
        Self {
            format: 0,
            audio_ptr: ptr::null_mut(),
            audio_len: 0,
            cover_ptr: ptr::null_mut(),
            cover_len: 0,
        }
    }
}

fn into_raw(buf: Vec<u8>) -> (*mut u8, usize) {
    let boxed = buf.into_boxed_slice();
    let len = boxed.len();
    (Box::into_raw(boxed).cast::<u8>(), len)
}

/// # Safety
/// `ptr`/`len` 必须来自 [`into_raw`] 且尚未释放。
unsafe fn free_raw(ptr: *mut u8, len: usize) {
    if !ptr.is_null() {
        // SAFETY: 由 into_raw 产生的 Box<[u8]>，长度一致
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len)));
    }
}

/// 解码一个容器
///
/// 成功返回 0 并填充 `out`，失败返回负数错误码，`out` 置空。
///
/// # Safety
/// - `data` 必须指向 `len` 字节的有效内存
/// - `out` 必须指向可写的 `NcmOutput`
#[no_mangle]
pub unsafe extern "C" fn ncm_decode(data: *const u8, len: usize, out: *mut NcmOutput) -> i32 {
    if data.is_null() || out.is_null() {
        return NcmStatus::NullPointer as i32;
    }
    // SAFETY: 调用方保证 data 指向 len 字节
    let input = slice::from_raw_parts(data, len);

    match decoder::decode(input) {
        Ok(decoded) => {
            let (audio_ptr, audio_len) = into_raw(decoded.audio);
            let (cover_ptr, cover_len) = decoded
                .cover
                .map_or((ptr::null_mut(), 0), |cover| into_raw(cover.data));
            // SAFETY: 调用方保证 out 可写
            *out = NcmOutput {
                format: decoded.format.flag(),
                audio_ptr,
                audio_len,
                cover_ptr,
                cover_len,
            };
            NcmStatus::Success as i32
        }
        Err(err) => {
            *out = NcmOutput::empty();
            NcmStatus::from(err) as i32
        }
    }
}

/// 释放 [`ncm_decode`] 分配的缓冲区并清零 `out`
///
/// # Safety
/// `out` 为空或指向由 `ncm_decode` 填充且未释放的 `NcmOutput`。
#[no_mangle]
pub unsafe extern "C" fn ncm_output_free(out: *mut NcmOutput) {
    if out.is_null() {
        return;
    }
    // SAFETY: 调用方保证 out 有效
    let output = &mut *out;
    free_raw(output.audio_ptr, output.audio_len);
    free_raw(output.cover_ptr, output.cover_len);
    *output = NcmOutput::empty();
}

/// 错误码对应的名称（静态 C 字符串），未知码返回 "Unknown"
#[no_mangle]
pub extern "C" fn ncm_error_name(code: i32) -> *const c_char {
    let name: &'static [u8] = match code {
        0 => b"Success\0",
        -1 => b"UnexpectedEof\0",
        -2 => b"BadMagic\0",
        -3 => b"BadAes\0",
        -4 => b"BadBase64\0",
        -5 => b"BadLength\0",
        -6 => b"BadMetadata\0",
        -7 => b"NullPointer\0",
        _ => b"Unknown\0",
    };
    name.as_ptr().cast::<c_char>()
}
