//! 表格数据模型与 Excel 加载
//!
//! 上传的 Excel 文件在此统一转换为 [`Grid`]：单元格在加载时一次性
//! 转换为带类型的 [`Cell`]，后续提取流程只通过 `to_trimmed_string`
//! 看到字符串，不再关心原始类型。

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

use crate::error::GridError;

/// 单元格值
///
/// 显式建模为 文本/数字/空 三种状态，数字在取值时字符串化
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// 转换为去除首尾空白的字符串，空单元格为空串
    pub fn to_trimmed_string(&self) -> String {
        match self {
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => {
                // 整数值不带小数点输出，与表格显示一致
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => Cell::Text(dt.to_string()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// 内存中的二维表格：第 0 行为标题行，之后为数据行
///
/// 行不保证等长，越界访问视为空单元格
#[derive(Debug, Clone)]
pub struct Grid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// 从行数据构建表格
    ///
    /// 数据为空或只有标题行时返回 [`GridError::NoDataRows`]
    pub fn from_rows(mut all_rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        if all_rows.len() <= 1 {
            return Err(GridError::NoDataRows);
        }
        let header_cells = all_rows.remove(0);
        let header = header_cells.iter().map(Cell::to_trimmed_string).collect();
        Ok(Self {
            header,
            rows: all_rows,
        })
    }

    /// 读取数据行的某一列，越界或列缺失返回空串
    pub fn cell_text(row: &[Cell], index: Option<usize>) -> String {
        match index {
            Some(idx) if idx < row.len() => row[idx].to_trimmed_string(),
            _ => String::new(),
        }
    }
}

/// 从内存中的 Excel 文件字节解析表格
///
/// 按文件魔数自动识别格式（xlsx/xls/ods 等）；
/// 默认使用第一个工作表，与上传场景保持一致
pub fn load_grid_from_bytes(bytes: &[u8]) -> Result<Grid, GridError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| GridError::WorkbookParseFailed {
            source: Box::new(e),
        })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(GridError::NoWorksheet)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| GridError::WorkbookParseFailed {
            source: Box::new(e),
        })?;

    let all_rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();

    Grid::from_rows(all_rows)
}
