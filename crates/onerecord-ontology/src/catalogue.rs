//! Built-in subset of the ONE Record cargo ontology (version 2.0.0).
//!
//! Covers the logistics objects most clients exchange (pieces, dangerous
//! goods and live animal pieces, items, shipments, waybills, sensors,
//! transport movements) together with the embedded objects they carry.

use onerecord_types::vocab::{cargo_class, cargo_property};
use onerecord_types::PrimitiveKind as P;

use crate::field::FieldSpec;
use crate::registry::{OntologyRegistry, RegistryBuilder};
use crate::variant::VariantDef;

/// Build the registry for the built-in catalogue.
pub fn cargo_ontology() -> OntologyRegistry {
    RegistryBuilder::new()
        .variants(cargo_variants())
        .build()
        .expect("built-in cargo catalogue is well-formed")
}

/// Variant definitions of the built-in catalogue, in registration order.
pub fn cargo_variants() -> Vec<VariantDef> {
    vec![
        class("LogisticsObject", None)
            .abstract_variant()
            .field(prim("LogisticsObject", "companyIdentifier", P::String).required())
            .field(prim("LogisticsObject", "revision", P::NonNegativeInteger))
            .field(ent("LogisticsObject", "events", "Event").many()),
        class("Value", None)
            .field(prim("Value", "unit", P::String))
            .field(prim("Value", "value", P::Double)),
        class("Dimensions", None)
            .field(ent("Dimensions", "height", "Value"))
            .field(ent("Dimensions", "length", "Value"))
            .field(ent("Dimensions", "volume", "Value"))
            .field(ent("Dimensions", "width", "Value")),
        class("Country", None)
            .field(prim("Country", "countryCode", P::String))
            .field(prim("Country", "countryName", P::String)),
        class("Address", None)
            .field(prim("Address", "addressCode", P::String).many())
            .field(prim("Address", "cityCode", P::String))
            .field(prim("Address", "cityName", P::String))
            .field(ent("Address", "country", "Country"))
            .field(prim("Address", "postalCode", P::String))
            .field(prim("Address", "regionCode", P::String))
            .field(prim("Address", "street", P::String).many()),
        class("Geolocation", None)
            .field(ent("Geolocation", "elevation", "Value"))
            .field(prim("Geolocation", "latitude", P::Double))
            .field(prim("Geolocation", "longitude", P::Double)),
        class("Location", None)
            .field(ent("Location", "address", "Address"))
            .field(prim("Location", "code", P::String))
            .field(ent("Location", "geolocation", "Geolocation"))
            .field(prim("Location", "locationName", P::String))
            .field(prim("Location", "locationType", P::String)),
        class("Company", None)
            .field(prim("Company", "companyName", P::String))
            .field(prim("Company", "iataCargoAgentCode", P::String)),
        class("Person", None)
            .field(prim("Person", "department", P::String))
            .field(prim("Person", "employeeId", P::String))
            .field(prim("Person", "firstName", P::String))
            .field(prim("Person", "jobTitle", P::String))
            .field(prim("Person", "lastName", P::String)),
        class("Event", None)
            .field(prim("Event", "dateTime", P::DateTime).required())
            .field(prim("Event", "eventCode", P::String))
            .field(prim("Event", "eventName", P::String))
            .field(prim("Event", "eventTypeIndicator", P::String).required())
            .field(ent("Event", "linkedObject", "LogisticsObject"))
            .field(ent("Event", "location", "Location"))
            .field(ent("Event", "performedBy", "Company"))
            .field(ent("Event", "performedByPerson", "Person")),
        class("VolumetricWeight", None)
            .field(ent("VolumetricWeight", "chargeableWeight", "Value"))
            .field(ent("VolumetricWeight", "conversionFactor", "Value")),
        class("SpecialHandling", Some("LogisticsObject"))
            .field(prim("SpecialHandling", "code", P::String))
            .field(prim("SpecialHandling", "handlingText", P::String)),
        class("Piece", Some("LogisticsObject"))
            .field(prim("Piece", "coload", P::Boolean))
            .field(ent("Piece", "containedPieces", "Piece").many())
            .field(prim("Piece", "declaredValueForCustoms", P::String).many())
            .field(ent("Piece", "dimensions", "Dimensions"))
            .field(prim("Piece", "goodsDescription", P::String).required())
            .field(ent("Piece", "grossWeight", "Value").required())
            .field(prim("Piece", "loadType", P::String))
            .field(prim("Piece", "nvdForCarriage", P::Boolean))
            .field(prim("Piece", "nvdForCustoms", P::Boolean))
            .field(ent("Piece", "otherParty", "Company").many())
            .field(prim("Piece", "packageMarkCoded", P::String))
            .field(ent("Piece", "productionCountry", "Country"))
            .field(ent("Piece", "shipment", "Shipment"))
            .field(ent("Piece", "shipper", "Company"))
            .field(prim("Piece", "shippingMarks", P::String).many())
            .field(prim("Piece", "slac", P::Integer))
            .field(ent("Piece", "specialHandling", "SpecialHandling").many())
            .field(prim("Piece", "stackable", P::Boolean))
            .field(ent("Piece", "transportMovements", "TransportMovement").many())
            .field(prim("Piece", "turnable", P::Boolean))
            .field(prim("Piece", "upid", P::String))
            .field(ent("Piece", "volumetricWeight", "VolumetricWeight")),
        class("PieceDg", Some("Piece"))
            .field(prim("PieceDg", "allPackedInOneIndicator", P::Boolean))
            .field(prim("PieceDg", "overpackIndicator", P::Boolean))
            .field(prim("PieceDg", "overpackT1", P::String))
            .field(prim("PieceDg", "overpackTypeCode", P::String))
            .field(prim("PieceDg", "qValueNumeric", P::Double)),
        class("PieceLiveAnimals", Some("Piece"))
            .field(prim("PieceLiveAnimals", "acquisitionDatetime", P::DateTime))
            .field(prim("PieceLiveAnimals", "annualQuotaQuantity", P::Integer))
            .field(prim("PieceLiveAnimals", "categoryCode", P::String).many())
            .field(prim("PieceLiveAnimals", "goodsTypeCode", P::String).required())
            .field(prim("PieceLiveAnimals", "quantityAnimals", P::Integer))
            .field(prim("PieceLiveAnimals", "speciesCommonName", P::String).many())
            .field(prim("PieceLiveAnimals", "speciesScientificName", P::String).many())
            .field(prim("PieceLiveAnimals", "specimenDescription", P::String)),
        class("Item", Some("LogisticsObject"))
            .field(prim("Item", "batchNumber", P::String))
            .field(ent("Item", "dimensions", "Dimensions"))
            .field(ent("Item", "isInPiece", "Piece"))
            .field(prim("Item", "lotNumber", P::String))
            .field(prim("Item", "productExpiryDate", P::DateTime))
            .field(prim("Item", "productionDate", P::DateTime))
            .field(ent("Item", "quantity", "Value"))
            .field(prim("Item", "quantityForUnitPrice", P::Double))
            .field(ent("Item", "weight", "Value")),
        class("ItemDg", Some("Item"))
            .field(ent("ItemDg", "emergencyContact", "Person").required())
            .field(ent("ItemDg", "netWeightMeasure", "Value").required())
            .field(prim("ItemDg", "reportableQuantity", P::String)),
        class("Shipment", Some("LogisticsObject"))
            .field(ent("Shipment", "containedPieces", "Piece").many())
            .field(prim("Shipment", "deliveryDate", P::DateTime))
            .field(prim("Shipment", "goodsDescription", P::String))
            .field(prim("Shipment", "incoterms", P::String).many())
            .field(ent("Shipment", "shipper", "Company").many())
            .field(ent("Shipment", "totalGrossWeight", "Value").required())
            .field(prim("Shipment", "totalPieceCount", P::Integer))
            .field(prim("Shipment", "totalSLAC", P::Integer))
            .field(ent("Shipment", "volumetricWeight", "VolumetricWeight").many().required())
            .field(prim("Shipment", "weightValuationIndicator", P::String)),
        class("Waybill", Some("LogisticsObject"))
            .field(prim("Waybill", "carrierDeclarationDate", P::DateTime).required())
            .field(ent("Waybill", "carrierDeclarationPlace", "Location").required())
            .field(prim("Waybill", "carrierDeclarationSignature", P::String).required())
            .field(ent("Waybill", "containedWaybills", "Waybill").many())
            .field(prim("Waybill", "destinationCharges", P::Double).many())
            .field(prim("Waybill", "destinationCurrencyRate", P::Double))
            .field(prim("Waybill", "waybillNumber", P::String).required())
            .field(prim("Waybill", "waybillPrefix", P::String))
            .field(prim("Waybill", "waybillType", P::String)),
        class("TransportMovement", Some("LogisticsObject"))
            .field(ent("TransportMovement", "arrivalLocation", "Location"))
            .field(ent("TransportMovement", "distanceMeasured", "Value"))
            .field(prim("TransportMovement", "fuelType", P::String))
            .field(prim("TransportMovement", "modeCode", P::String))
            .field(prim("TransportMovement", "modeQualifier", P::String))
            .field(ent("TransportMovement", "payload", "Value").many())
            .field(prim("TransportMovement", "seal", P::String))
            .field(ent("TransportMovement", "transportedPieces", "Piece").many()),
        class("Measurements", None)
            .field(prim("Measurements", "measurementTimestamp", P::DateTime).required()),
        class("MeasurementsGeoloc", Some("Measurements"))
            .field(ent("MeasurementsGeoloc", "geolocationMeasurement", "Geolocation")),
        class("Sensor", Some("LogisticsObject"))
            .field(prim("Sensor", "sensorDescription", P::String))
            .field(prim("Sensor", "sensorName", P::String))
            .field(prim("Sensor", "sensorSerialNumber", P::String))
            .field(prim("Sensor", "sensorType", P::String)),
        class("SensorGeoloc", Some("Sensor"))
            .field(ent("SensorGeoloc", "val", "MeasurementsGeoloc").many()),
    ]
}

fn class(name: &str, parent: Option<&str>) -> VariantDef {
    let def = VariantDef::new(cargo_class(name), name);
    match parent {
        Some(parent) => def.extends(cargo_class(parent)),
        None => def,
    }
}

fn prim(class: &str, property: &str, kind: P) -> FieldSpec {
    FieldSpec::primitive(cargo_property(class, property), kind)
}

fn ent(class: &str, property: &str, range: &str) -> FieldSpec {
    FieldSpec::entity(cargo_property(class, property), cargo_class(range))
}
