// Dweve YML - Streaming catalog feed reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Well-formed catalog documents.

/// One offer with one delivery option.
pub fn simple_catalog() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<yml_catalog date="2019-11-05 17:45">
  <shop>
    <name>Test Shop</name>
    <company>Test Company</company>
    <url>https://shop.example.com</url>
    <currencies>
      <currency id="RUR" rate="1"/>
    </currencies>
    <categories>
      <category id="1">Books</category>
    </categories>
    <offers>
      <offer id="12345" type="vitrine" available="true">
        <url>https://shop.example.com/books/12345</url>
        <price>450</price>
        <currencyId>RUR</currencyId>
        <categoryId>1</categoryId>
        <name>Test Book</name>
        <delivery-options>
          <option cost="300" days="1" order-before="18"/>
        </delivery-options>
      </offer>
    </offers>
  </shop>
</yml_catalog>
"#
}

/// All shop collections populated, three offers in document order `a1`, `b2`, `c3`.
pub fn full_catalog() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- full catalog fixture -->
<yml_catalog date="2024-02-29 23:59">
  <shop>
    <name>Book House</name>
    <company>Book House LLC</company>
    <url>https://bookhouse.example.com</url>
    <currencies>
      <currency id="RUR" rate="1"/>
      <currency id="USD" rate="90"/>
    </currencies>
    <categories>
      <category id="1">Books</category>
      <category id="2" parentId="1">Fiction</category>
      <category id="3" parentId="1">Science</category>
    </categories>
    <delivery-options>
      <option cost="0" days="3-5"/>
      <option cost="500" days="1" order-before="12"/>
    </delivery-options>
    <offers>
      <offer id="a1" type="vitrine" available="true" group_id="10">
        <url>https://bookhouse.example.com/a1</url>
        <price>990</price>
        <currencyId>RUR</currencyId>
        <categoryId>2</categoryId>
        <picture>https://bookhouse.example.com/a1.jpg</picture>
        <store>false</store>
        <pickup>true</pickup>
        <delivery>true</delivery>
        <author>A. Author</author>
        <name>First &amp; Foremost</name>
        <publisher>Press</publisher>
        <series>Classics</series>
        <year>2001</year>
        <description><![CDATA[<p>A <b>classic</b>.</p>]]></description>
        <ISBN>978-0-00-000000-1</ISBN>
        <language>en</language>
        <binding>hardcover</binding>
        <page_extent>412</page_extent>
        <delivery-options>
          <option cost="200" days="2"/>
          <option cost="400" days="1" order-before="15"/>
        </delivery-options>
        <param name="Cover">Hard</param>
        <dimensions>20x13x3</dimensions>
      </offer>
      <offer id="b2" available="false">
        <price>15.50</price>
        <currencyId>USD</currencyId>
        <categoryId>3</categoryId>
        <name>Second Book</name>
        <ID>inner-b2</ID>
        <barcode>4600000000002</barcode>
        <weight>0.4</weight>
        <manufacturer_warranty>false</manufacturer_warranty>
      </offer>
      <offer id="c3">
        <name>Third Book</name>
      </offer>
    </offers>
  </shop>
</yml_catalog>
"#
}

/// A single offer element with id `id`, used by [`catalog_with_offers`].
pub fn offer_xml(id: usize) -> String {
    format!(
        r#"      <offer id="{id}" type="vitrine" available="true">
        <price>{price}</price>
        <currencyId>RUR</currencyId>
        <categoryId>{category}</categoryId>
        <name>Generated Book {id}</name>
        <delivery-options>
          <option cost="{cost}" days="1"/>
        </delivery-options>
      </offer>
"#,
        id = id,
        price = 100 + id,
        category = id % 5 + 1,
        cost = id % 3 * 100,
    )
}

/// A well-formed catalog with `count` offers whose `id`s run `1..=count`.
pub fn catalog_with_offers(count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<yml_catalog date="2023-01-15 10:00">
  <shop>
    <name>Generated Shop</name>
    <currencies>
      <currency id="RUR" rate="1"/>
    </currencies>
    <offers>
"#,
    );
    for id in 1..=count {
        xml.push_str(&offer_xml(id));
    }
    xml.push_str("    </offers>\n  </shop>\n</yml_catalog>\n");
    xml
}
