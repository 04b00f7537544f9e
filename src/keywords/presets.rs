// Built-in vocabulary for the memory-semiconductor news corpus.
//
// Mixed Latin and Hangul terms, grouped the way the analysts reviewed them.
// Overlapping entries (HBM / HBM3 / HBM3E) are deliberate.

use super::vocabulary::Vocabulary;
use crate::error::ConfigError;

pub const SEMICONDUCTOR_TERMS: &[&str] = &[
    // memory
    "HBM", "HBM2", "HBM3", "HBM3E",
    "DDR", "DDR4", "DDR5", "LPDDR",
    "DRAM", "NAND", "SSD", "V-NAND",
    // process and manufacturing
    "EUV", "GAA", "파운드리", "패키징",
    "10나노", "7나노", "5나노", "3나노", "2나노",
    // applications
    "AI", "인공지능", "머신러닝", "GPU",
    "서버", "데이터센터", "클라우드",
    "자율주행", "전기차", "차량용",
    "스마트폰", "모바일", "5G",
    // companies and partners
    "엔비디아", "NVIDIA", "AMD", "Intel",
    "TSMC", "삼성전자", "SK하이닉스",
    // business
    "양산", "개발", "출시", "공급",
    "투자", "매출", "수율", "점유율",
    // next generation
    "CXL", "PIM", "CIS", "AP",
    "하이브리드본딩", "3D", "TSV",
];

pub fn semiconductor() -> Result<Vocabulary, ConfigError> {
    Vocabulary::new(SEMICONDUCTOR_TERMS)
}
