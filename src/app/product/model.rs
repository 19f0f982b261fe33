//! 产品数据模型与请求参数

use std::fmt;
use validator::Validate;

use crate::core::error::CoreError;

/// 产品表中的一行
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
}

/// `/select` 响应中单行的文本形式
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id: {} \nname: {}", self.id, self.name)
    }
}

/// 已校验为整数的产品 id，同时保留调用方传入的原始写法
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductId {
    pub value: i64,
    pub raw: String,
}

/// 响应体原样回显调用方传入的 id
impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// 经过校验、可以写入数据库的产品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
}

/// `/insert` 与 `/update` 的查询参数
///
/// `product_name` 只要求存在，空字符串也是合法的名称。
#[derive(Debug, Default, Validate)]
pub struct ProductParams {
    #[validate(length(min = 1, message = "query parameter 'id' must not be empty"))]
    pub id: Option<String>,
    pub product_name: Option<String>,
}

/// `/delete` 的查询参数
#[derive(Debug, Default, Validate)]
pub struct IdParams {
    #[validate(length(min = 1, message = "query parameter 'id' must not be empty"))]
    pub id: Option<String>,
}

impl ProductParams {
    /// 从查询字符串键值对构造，重复的键只取第一个值
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "id" if params.id.is_none() => params.id = Some(value),
                "product_name" if params.product_name.is_none() => {
                    params.product_name = Some(value)
                }
                _ => {}
            }
        }
        params
    }

    pub fn into_new_product(self) -> Result<NewProduct, CoreError> {
        self.validate()?;

        let id = parse_id(require(self.id, "id")?)?;
        let name = require(self.product_name, "product_name")?;

        Ok(NewProduct { id, name })
    }
}

impl IdParams {
    /// 从查询字符串键值对构造，重复的键只取第一个值
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            id: pairs
                .into_iter()
                .find(|(key, _)| key == "id")
                .map(|(_, value)| value),
        }
    }

    pub fn into_id(self) -> Result<ProductId, CoreError> {
        self.validate()?;
        parse_id(require(self.id, "id")?)
    }
}

fn require(value: Option<String>, name: &str) -> Result<String, CoreError> {
    value.ok_or_else(|| CoreError::BadRequest(format!("missing query parameter '{}'", name)))
}

fn parse_id(raw: String) -> Result<ProductId, CoreError> {
    match raw.parse() {
        Ok(value) => Ok(ProductId { value, raw }),
        Err(_) => Err(CoreError::BadRequest(format!(
            "query parameter 'id' must be an integer, got '{}'",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(id: Option<&str>, name: Option<&str>) -> ProductParams {
        ProductParams {
            id: id.map(str::to_string),
            product_name: name.map(str::to_string),
        }
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn bad_request_message(err: CoreError) -> String {
        match err {
            CoreError::BadRequest(msg) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_display_matches_select_format() {
        let product = Product {
            id: 3,
            name: "Widget".to_string(),
        };
        assert_eq!(product.to_string(), "id: 3 \nname: Widget");
    }

    #[test]
    fn test_valid_product_params() {
        let product = params(Some("42"), Some("Blue Widget"))
            .into_new_product()
            .unwrap();
        assert_eq!(product.id.value, 42);
        assert_eq!(product.id.to_string(), "42");
        assert_eq!(product.name, "Blue Widget");
    }

    #[test]
    fn test_id_keeps_raw_spelling() {
        let product = params(Some("05"), Some("A")).into_new_product().unwrap();
        assert_eq!(product.id.value, 5);
        assert_eq!(product.id.to_string(), "05");

        let id = IdParams {
            id: Some("+7".to_string()),
        }
        .into_id()
        .unwrap();
        assert_eq!(id.value, 7);
        assert_eq!(id.raw, "+7");
    }

    #[test]
    fn test_missing_parameters() {
        let msg = bad_request_message(params(None, Some("Widget")).into_new_product().unwrap_err());
        assert_eq!(msg, "missing query parameter 'id'");

        let msg = bad_request_message(params(Some("1"), None).into_new_product().unwrap_err());
        assert_eq!(msg, "missing query parameter 'product_name'");

        let msg = bad_request_message(IdParams::default().into_id().unwrap_err());
        assert_eq!(msg, "missing query parameter 'id'");
    }

    #[test]
    fn test_empty_id_rejected_empty_name_accepted() {
        let product = params(Some("1"), Some("")).into_new_product().unwrap();
        assert_eq!(product.name, "");

        let msg = bad_request_message(
            IdParams {
                id: Some(String::new()),
            }
            .into_id()
            .unwrap_err(),
        );
        assert_eq!(msg, "query parameter 'id' must not be empty");
    }

    #[test]
    fn test_non_integer_id() {
        let msg = bad_request_message(params(Some("abc"), Some("Widget")).into_new_product().unwrap_err());
        assert!(msg.contains("must be an integer"));

        let id = IdParams {
            id: Some("-7".to_string()),
        }
        .into_id()
        .unwrap();
        assert_eq!(id.value, -7);
    }

    #[test]
    fn test_from_pairs_takes_first_value() {
        let params = ProductParams::from_pairs(pairs(&[
            ("id", "3"),
            ("other", "x"),
            ("id", "4"),
            ("product_name", "A"),
            ("product_name", "B"),
        ]));
        assert_eq!(params.id.as_deref(), Some("3"));
        assert_eq!(params.product_name.as_deref(), Some("A"));

        let params = IdParams::from_pairs(pairs(&[("id", "9"), ("id", "10")]));
        assert_eq!(params.id.as_deref(), Some("9"));

        assert_eq!(IdParams::from_pairs(Vec::new()).id, None);
    }
}
