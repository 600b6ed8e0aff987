use aws_sdk_dynamodb::types::AttributeValue;
use lag_cache_core::{Result, Value as CoreValue};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this DynamoDB driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a DynamoDB AttributeValue to a core value.
    pub fn from_ddb(val: &AttributeValue) -> Result<Self> {
        use AttributeValue as AV;

        let core_value = match val {
            AV::Null(_) => CoreValue::Null,
            AV::Bool(val) => CoreValue::Bool(*val),
            AV::S(val) => CoreValue::String(val.clone()),
            AV::N(val) => parse_number(val)?,
            AV::Ss(vals) => CoreValue::Array(vals.iter().cloned().map(CoreValue::String).collect()),
            AV::Ns(vals) => CoreValue::Array(
                vals.iter()
                    .map(|val| parse_number(val))
                    .collect::<Result<_>>()?,
            ),
            AV::L(vals) => CoreValue::Array(
                vals.iter()
                    .map(|val| Value::from_ddb(val).map(Value::into_inner))
                    .collect::<Result<_>>()?,
            ),
            AV::M(map) => CoreValue::Object(
                map.iter()
                    .map(|(name, val)| Ok((name.clone(), Value::from_ddb(val)?.into_inner())))
                    .collect::<Result<_>>()?,
            ),
            _ => lag_cache_core::bail!("unsupported DynamoDB attribute value; value={val:?}"),
        };

        Ok(Value(core_value))
    }

    /// Converts this value to a DynamoDB AttributeValue.
    pub fn to_ddb(&self) -> AttributeValue {
        use AttributeValue as AV;

        match &self.0 {
            CoreValue::Null => AV::Null(true),
            CoreValue::Bool(val) => AV::Bool(*val),
            CoreValue::Number(val) => AV::N(val.to_string()),
            CoreValue::String(val) => AV::S(val.clone()),
            CoreValue::Array(vals) => AV::L(
                vals.iter()
                    .map(|val| Value(val.clone()).to_ddb())
                    .collect(),
            ),
            CoreValue::Object(map) => AV::M(
                map.iter()
                    .map(|(name, val)| (name.clone(), Value(val.clone()).to_ddb()))
                    .collect(),
            ),
        }
    }
}

fn parse_number(val: &str) -> Result<CoreValue> {
    if let Ok(n) = val.parse::<i64>() {
        return Ok(CoreValue::from(n));
    }

    if let Ok(n) = val.parse::<u64>() {
        return Ok(CoreValue::from(n));
    }

    match val.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Ok(CoreValue::Number(n)),
        None => lag_cache_core::bail!("invalid DynamoDB number; value={val:?}"),
    }
}
